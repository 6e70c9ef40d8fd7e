pub mod assets;
pub mod contact;
