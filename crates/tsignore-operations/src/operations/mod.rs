mod add_ignores;

pub use add_ignores::{
    AddIgnoresEnvironment, AddIgnoresOperation, AddIgnoresOptions, AddIgnoresOutput, MAX_PASSES,
};
