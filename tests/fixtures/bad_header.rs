// openapi:main
// openapi: 3.0.3
// info:
//   title: Broken API
//   version: "1.0"

// openapi:operation GET /items
pub fn list_items() {}
