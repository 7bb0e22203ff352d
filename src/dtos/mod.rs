pub mod favoritedtos;
pub mod propertydtos;
pub mod userdtos;
