//! Integration tests spanning parse, build, and map.

mod fixtures;
mod mapping;
