//! Segment types: parameters bound from captured positional segments.
//!
//! Conversion fails closed. `"12abc"` is not an integer and `"1e3"` is not
//! a `u32`; neither is ever truncated or defaulted.

use crate::descriptor::{ParamKind, SegmentType};
use crate::error::{BindError, BindResult};

use super::core::{BindCursor, FromInvocation};

fn accept_any(_: &str) -> bool {
    true
}

impl FromInvocation for String {
    fn kind() -> ParamKind {
        ParamKind::Segment(SegmentType {
            name: "String",
            accepts: accept_any,
        })
    }

    fn from_invocation(cursor: &mut BindCursor<'_>) -> BindResult<Self> {
        let (_, segment) = cursor.next_segment("String")?;
        Ok(segment.to_string())
    }
}

macro_rules! impl_parsed_segment {
    ($name:literal => $($ty:ty),+ $(,)?) => {
        $(
            impl FromInvocation for $ty {
                fn kind() -> ParamKind {
                    ParamKind::Segment(SegmentType {
                        name: $name,
                        accepts: |raw: &str| raw.parse::<$ty>().is_ok(),
                    })
                }

                fn from_invocation(cursor: &mut BindCursor<'_>) -> BindResult<Self> {
                    let (index, segment) = cursor.next_segment($name)?;
                    segment.parse::<$ty>().map_err(|_| BindError::TypeMismatch {
                        index,
                        expected: $name,
                        value: segment.to_string(),
                    })
                }
            }
        )+
    };
}

impl_parsed_segment!("Integer" => i8, i16, i32, i64, i128, isize);
impl_parsed_segment!("Integer" => u8, u16, u32, u64, u128, usize);
impl_parsed_segment!("Float" => f32, f64);
impl_parsed_segment!("Boolean" => bool);
impl_parsed_segment!("Char" => char);

#[cfg(test)]
mod tests {
    use switchyard_core::{InvocationMode, InvocationRequest};

    use super::*;
    use crate::context::tests::context_for;

    fn captures(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn ctx() -> crate::Context {
        context_for(
            InvocationRequest::builder("t", InvocationMode::Cli)
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn integers_fail_closed() {
        let ctx = ctx();
        let caps = captures(&["12abc"]);
        let mut cursor = BindCursor::new(&ctx, &caps);
        assert_eq!(
            i64::from_invocation(&mut cursor),
            Err(BindError::TypeMismatch {
                index: 0,
                expected: "Integer",
                value: "12abc".into()
            })
        );
    }

    #[test]
    fn segments_bind_in_order() {
        let ctx = ctx();
        let caps = captures(&["7", "true", "x"]);
        let mut cursor = BindCursor::new(&ctx, &caps);
        assert_eq!(u32::from_invocation(&mut cursor), Ok(7));
        assert_eq!(bool::from_invocation(&mut cursor), Ok(true));
        assert_eq!(char::from_invocation(&mut cursor), Ok('x'));
        assert!(cursor.finish().is_ok());
    }

    #[test]
    fn running_out_of_segments_is_missing() {
        let ctx = ctx();
        let caps = captures(&[]);
        let mut cursor = BindCursor::new(&ctx, &caps);
        assert_eq!(
            String::from_invocation(&mut cursor),
            Err(BindError::Missing {
                index: 0,
                expected: "String"
            })
        );
    }

    #[test]
    fn leftover_segments_are_reported() {
        let ctx = ctx();
        let caps = captures(&["a", "b", "c"]);
        let mut cursor = BindCursor::new(&ctx, &caps);
        let _ = String::from_invocation(&mut cursor);
        assert_eq!(cursor.finish(), Err(BindError::ExtraArguments { count: 2 }));
    }

    #[test]
    fn lexical_checks_match_conversion() {
        let ParamKind::Segment(int) = i64::kind() else {
            panic!("i64 must be a segment type");
        };
        assert!((int.accepts)("-42"));
        assert!(!(int.accepts)("abc"));
        let ParamKind::Segment(float) = f64::kind() else {
            panic!("f64 must be a segment type");
        };
        assert!((float.accepts)("2.5"));
        let ParamKind::Segment(string) = String::kind() else {
            panic!("String must be a segment type");
        };
        assert!((string.accepts)("anything"));
    }
}
