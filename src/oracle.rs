use crate::error::OracleError;

/// The external move oracle. Every call takes an encoded state string (see
/// [`crate::codec`]) and answers with an opaque reply this crate never
/// interprets; it is handed on to whoever applies moves.
pub trait MoveOracle {
    /// Legal actions available in `encoded`.
    fn legal_actions(&self, encoded: &str) -> Result<String, OracleError>;

    /// The oracle's preferred action for the side to move.
    fn best_move(&self, encoded: &str) -> Result<String, OracleError>;

    /// Derived game state (check, mate, ...) of `encoded`.
    fn state(&self, encoded: &str) -> Result<String, OracleError>;
}

impl<O: MoveOracle + ?Sized> MoveOracle for &O {
    fn legal_actions(&self, encoded: &str) -> Result<String, OracleError> {
        (**self).legal_actions(encoded)
    }

    fn best_move(&self, encoded: &str) -> Result<String, OracleError> {
        (**self).best_move(encoded)
    }

    fn state(&self, encoded: &str) -> Result<String, OracleError> {
        (**self).state(encoded)
    }
}

/// Stand-in used when no oracle is attached; every query fails with
/// [`OracleError::Unavailable`].
#[derive(Debug, Default, Clone, Copy)]
pub struct Offline;

impl MoveOracle for Offline {
    fn legal_actions(&self, _encoded: &str) -> Result<String, OracleError> {
        Err(OracleError::Unavailable)
    }

    fn best_move(&self, _encoded: &str) -> Result<String, OracleError> {
        Err(OracleError::Unavailable)
    }

    fn state(&self, _encoded: &str) -> Result<String, OracleError> {
        Err(OracleError::Unavailable)
    }
}
