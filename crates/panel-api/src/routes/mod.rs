pub mod db_access;
pub mod mockdata;
