mod dump;
mod record_builder;
mod scalars;
mod type_key;
mod value;
