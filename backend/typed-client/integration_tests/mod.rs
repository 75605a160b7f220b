mod errors;
mod files;
mod helpers;
mod requests;
