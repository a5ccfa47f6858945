mod common;
mod portfolio;
