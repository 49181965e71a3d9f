pub mod message;
pub mod wordcount;
