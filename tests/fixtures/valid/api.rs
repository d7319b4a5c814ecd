//! Example annotated service used by the integration tests.

// openapi:main
// openapi: 3.0.3
// info:
//   title: Items API
//   version: "1.0"

/// openapi:operation GET /items ?pub listItems
/// responses:
///   "200":
///     description: ok
///     content:
///       application/json:
///         schema:
///           $ref: "#/components/schemas/Item"
pub fn list_items() {}

/// openapi:operation POST /items createItem
/// responses:
///   "201":
///     description: created
pub fn create_item() {}

// openapi:components schemas
// Item:
//   type: object
//   properties:
//     id:
//       type: integer

// openapi:components schemas
// User:
//   type: object
//   properties:
//     name:
//       type: string
