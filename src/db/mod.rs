pub mod cache;
pub mod db;
pub mod favoritedb;
pub mod propertydb;
pub mod userdb;
