// openapi:main
// openapi: 3.0.3
// info:
//   title: Greedy API
//   version: "1.0"
// paths:
//   /mine:
//     get:
//       operationId: mine
