//! 何もしない数式組版（端末には数式エンジンが無いので LaTeX をそのまま見せる）

use crate::ports::outbound::MathTypesetter;
use common::error::Error;

#[derive(Debug, Clone, Default)]
pub struct NoopTypesetter;

impl MathTypesetter for NoopTypesetter {
    fn typeset(&self, _html: &str) -> Result<(), Error> {
        Ok(())
    }
}
