//! Declarative helpers shared across the `meshfold` workspace.

pub mod macros;
