pub mod gender;
pub mod ids;
pub mod note_role;
pub mod pagination;
pub mod text;

mod error;

pub use error::Error;
pub use gender::Gender;
pub use note_role::NoteRole;
pub use pagination::Page;

pub type Result<T, E = Error> = std::result::Result<T, E>;
