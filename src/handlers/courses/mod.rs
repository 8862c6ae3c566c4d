// handlers/courses/mod.rs - Course CRUD handlers
//
// Each handler parses the request, runs the service call under a fresh
// per-request deadline and converts the outcome into a status code + JSON.

pub mod create; // POST   /api/v1/courses
pub mod list; // GET    /api/v1/courses
pub mod show; // GET    /api/v1/courses/:id
pub mod update; // PUT    /api/v1/courses/:id
pub mod delete; // DELETE /api/v1/courses/:id

pub use create::create;
pub use delete::delete;
pub use list::list;
pub use show::show;
pub use update::update;
