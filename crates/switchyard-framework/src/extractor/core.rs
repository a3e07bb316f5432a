use crate::context::Context;
use crate::descriptor::ParamKind;
use crate::error::{BindError, BindResult};

/// A type that can be bound as a handler parameter.
pub trait FromInvocation: Sized {
    /// Declares how this parameter is bound.
    fn kind() -> ParamKind;

    /// Binds the parameter, consuming a segment from `cursor` if it is a
    /// segment type.
    fn from_invocation(cursor: &mut BindCursor<'_>) -> BindResult<Self>;
}

/// Walks the captured segments of one invocation while parameters bind.
#[derive(Debug)]
pub struct BindCursor<'a> {
    ctx: &'a Context,
    captures: &'a [String],
    next: usize,
}

impl<'a> BindCursor<'a> {
    pub fn new(ctx: &'a Context, captures: &'a [String]) -> Self {
        Self {
            ctx,
            captures,
            next: 0,
        }
    }

    pub fn context(&self) -> &'a Context {
        self.ctx
    }

    /// Takes the next captured segment together with its index.
    pub fn next_segment(&mut self, expected: &'static str) -> BindResult<(usize, &'a str)> {
        let index = self.next;
        let segment = self
            .captures
            .get(index)
            .ok_or(BindError::Missing { index, expected })?;
        self.next += 1;
        Ok((index, segment.as_str()))
    }

    /// Number of captures not yet consumed.
    pub fn remaining(&self) -> usize {
        self.captures.len().saturating_sub(self.next)
    }

    /// Fails if any captured segment was left unconsumed.
    pub fn finish(self) -> BindResult<()> {
        match self.remaining() {
            0 => Ok(()),
            count => Err(BindError::ExtraArguments { count }),
        }
    }
}
