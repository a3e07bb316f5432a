use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;
use switchyard_core::{Failure, Payload};

use crate::context::Context;
use crate::descriptor::ParamKind;
use crate::error::BindError;
use crate::extractor::{BindCursor, FromInvocation};

use super::response::IntoOutcome;

/// An invocable action body.
///
/// # Blanket Implementation
///
/// Implemented for async functions that:
/// - take 0-16 parameters implementing [`FromInvocation`]
/// - return a type implementing [`IntoOutcome`]
///
/// ```rust
/// use switchyard_core::ActionResult;
/// use switchyard_framework::Context;
///
/// // Zero segments, reads a named attribute from the context
/// async fn say(ctx: Context) -> ActionResult<String> {
///     Ok(ctx.require("--words")?.to_string())
/// }
///
/// // One String segment
/// async fn say_words(words: String) -> String {
///     words
/// }
/// ```
pub trait Handler<T>: Clone + Send + Sync + 'static {
    /// Parameter kinds in declaration order.
    fn params() -> Vec<ParamKind>;

    /// Binds every parameter, then runs the handler.
    ///
    /// A binding failure is returned without the handler body ever running.
    fn call(
        self,
        ctx: Context,
        captures: Vec<String>,
    ) -> BoxFuture<'static, Result<Payload, Failure>>;
}

/// A type-erased handler stored in descriptors.
pub type BoxedHandler =
    Arc<dyn Fn(Context, Vec<String>) -> BoxFuture<'static, Result<Payload, Failure>> + Send + Sync>;

/// Erases a handler so descriptors of different shapes share one type.
pub fn into_handler<H, T>(handler: H) -> BoxedHandler
where
    H: Handler<T>,
    T: 'static,
{
    Arc::new(move |ctx, captures| handler.clone().call(ctx, captures))
}

macro_rules! impl_handler {
    (
        $($ty:ident),*
    ) => {
        #[allow(non_snake_case, unused_mut)]
        impl<F, Fut, Res, $($ty,)*> Handler<($($ty,)*)> for F
        where
            F: FnOnce($($ty,)*) -> Fut + Clone + Send + Sync + 'static,
            Fut: Future<Output = Res> + Send + 'static,
            Res: IntoOutcome + 'static,
            $( $ty: FromInvocation + Send + 'static, )*
        {
            fn params() -> Vec<ParamKind> {
                vec![$($ty::kind(),)*]
            }

            fn call(
                self,
                ctx: Context,
                captures: Vec<String>,
            ) -> BoxFuture<'static, Result<Payload, Failure>> {
                let bound = {
                    let mut cursor = BindCursor::new(&ctx, &captures);
                    (|| -> Result<($($ty,)*), BindError> {
                        $(
                            let $ty = $ty::from_invocation(&mut cursor)?;
                        )*
                        cursor.finish()?;
                        Ok(($($ty,)*))
                    })()
                };

                match bound {
                    Ok(($($ty,)*)) => Box::pin(async move {
                        (self)($($ty,)*).await.into_outcome().map_err(Failure::from)
                    }),
                    Err(error) => {
                        let failure = Failure::from(error);
                        Box::pin(async move { Err(failure) })
                    }
                }
            }
        }
    };
}

impl_handler!();
impl_handler!(T1);
impl_handler!(T1, T2);
impl_handler!(T1, T2, T3);
impl_handler!(T1, T2, T3, T4);
impl_handler!(T1, T2, T3, T4, T5);
impl_handler!(T1, T2, T3, T4, T5, T6);
impl_handler!(T1, T2, T3, T4, T5, T6, T7);
impl_handler!(T1, T2, T3, T4, T5, T6, T7, T8);
impl_handler!(T1, T2, T3, T4, T5, T6, T7, T8, T9);
impl_handler!(T1, T2, T3, T4, T5, T6, T7, T8, T9, T10);
impl_handler!(T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11);
impl_handler!(T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11, T12);
impl_handler!(T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11, T12, T13);
impl_handler!(T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11, T12, T13, T14);
impl_handler!(
    T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11, T12, T13, T14, T15
);
impl_handler!(
    T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11, T12, T13, T14, T15, T16
);
