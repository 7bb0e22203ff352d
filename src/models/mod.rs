pub mod favoritemodel;
pub mod propertymodel;
pub mod usermodel;
