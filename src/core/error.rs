use thiserror::Error;

/// Reasons a design edit is refused. None of these are fatal: the design is
/// left untouched and the caller decides what to surface.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DesignError {
    #[error("{module} requires technology '{tech}' which has not been researched")]
    TechLocked { module: String, tech: String },

    #[error("{module} needs {required} hull space; overloaded by {overload} units")]
    InsufficientSpace {
        module: String,
        required: u32,
        overload: u32,
    },

    #[error("{module} is a core {kind} module and cannot be removed")]
    CoreModule { module: String, kind: &'static str },

    #[error("Design already has a hull; {module} cannot be installed")]
    HullAlreadyInstalled { module: String },

    #[error("No module installed at slot {0}")]
    NoSuchSlot(usize),

    #[error("Design '{name}' is not buildable: {reason}")]
    NotBuildable { name: String, reason: String },
}

#[derive(Error, Debug)]
pub enum FleetError {
    #[error("Design error: {0}")]
    Design(#[from] DesignError),

    #[error("Unknown module template: {0}")]
    UnknownModule(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FleetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overload_message_names_amount() {
        let err = DesignError::InsufficientSpace {
            module: "Siege Cannon".into(),
            required: 1000,
            overload: 100,
        };
        assert!(err.to_string().contains("overloaded by 100 units"));
    }

    #[test]
    fn test_design_error_converts() {
        let err: FleetError = DesignError::NoSuchSlot(3).into();
        assert!(matches!(err, FleetError::Design(DesignError::NoSuchSlot(3))));
    }
}
