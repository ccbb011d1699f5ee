mod meta;
mod ops;
