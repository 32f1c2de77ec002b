pub mod classify_handlers;
