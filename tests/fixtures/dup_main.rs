// openapi:main
// openapi: 3.0.3
// info:
//   title: First
//   version: "1.0"

// openapi:main
// openapi: 3.0.3
// info:
//   title: Second
//   version: "2.0"
