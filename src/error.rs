//! Error types.
//!
//! None of these escape a row controller: each is logged at the point where
//! it is detected and the row renders less instead.

/// Failures resolving a full-width renderer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FullWidthError {
    /// The renderer ships in an optional module the host did not load.
    #[error("full-width renderer `{name}` needs the {module} module, which is not loaded")]
    ModuleNotLoaded { name: String, module: String },
    /// Nothing is registered under this name.
    #[error("full-width renderer `{name}` is not registered")]
    UnknownRenderer { name: String },
    /// A deferred renderer's producer went away without resolving.
    #[error("deferred full-width renderer `{name}` was dropped before it resolved")]
    Abandoned { name: String },
}

/// A user row style or class hook returned something unusable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StyleHookError {
    #[error("row style hook must return property/value pairs, not text `{0}`")]
    TextStyle(String),
    #[error("row style hook returned a value for an empty property name")]
    EmptyProperty,
    #[error("row class hook returned a class containing whitespace: `{0}`")]
    InvalidClass(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_renderer() {
        let err = FullWidthError::ModuleNotLoaded {
            name: "agDetailCellRenderer".into(),
            module: "master-detail".into(),
        };
        assert_eq!(
            err.to_string(),
            "full-width renderer `agDetailCellRenderer` needs the master-detail module, which is not loaded"
        );
        let err = FullWidthError::UnknownRenderer { name: "fancy".into() };
        assert_eq!(err.to_string(), "full-width renderer `fancy` is not registered");
    }

    #[test]
    fn style_hook_messages() {
        assert_eq!(
            StyleHookError::TextStyle("color: red".into()).to_string(),
            "row style hook must return property/value pairs, not text `color: red`"
        );
    }
}
