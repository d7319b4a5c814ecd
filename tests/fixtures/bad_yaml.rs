// openapi:components schemas
// Item:
//   type: [unclosed
pub fn broken() {}
