// openapi:operaton GET /items listItems
pub fn typo() {}
