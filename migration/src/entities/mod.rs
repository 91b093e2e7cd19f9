pub mod bookmark;
pub mod folder;
pub mod user;

pub use bookmark::Entity as BookmarkEntity;
pub use folder::Entity as FolderEntity;
pub use user::Entity as UserEntity;
