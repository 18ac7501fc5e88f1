//! One service per record type. Each owns its collections and implements the
//! create/read/update/delete/list/search/stats operations on top of them.

pub mod applications;
pub mod shop;
pub mod notes;
pub mod contacts;
pub mod students;

pub use applications::ApplicationService;
pub use contacts::ContactsService;
pub use notes::NotesService;
pub use shop::ShopService;
pub use students::StudentsService;
