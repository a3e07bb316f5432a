// ─── Internal helper: ControllerMetadata builder ──────────────────────────────
//
// Used exclusively by `define_controller!`.  Not part of the public API.

/// Internal helper macro: builds a [`ControllerMetadata`] from optional
/// overrides.
///
/// ```text
/// __controller_metadata!(
///     @parse [$doc?]        ← captured doc literal
///            key: val, …    ← raw metadata tokens
/// )
///
/// Remaining tokens travel bracketed (`:: [..]`) so the muncher never has
/// to decide where a trailing `tt` repetition ends.
/// ```
///
/// [`ControllerMetadata`]: crate::controller::ControllerMetadata
#[macro_export]
#[doc(hidden)]
macro_rules! __controller_metadata {
    (@parse [$($doc:expr)?] $($meta:tt)*) => {
        $crate::__controller_metadata!(
            @cm [$($doc)?] [] [] [] :: [$($meta)*]
        )
    };

    // Skip commas
    (@cm $doc:tt $ver:tt $dsc:tt $fd:tt :: [, $($rest:tt)*]) => {
        $crate::__controller_metadata!(@cm $doc $ver $dsc $fd :: [$($rest)*])
    };

    // version: "..."
    (@cm $doc:tt [$($old:expr)?] $dsc:tt $fd:tt :: [version : $v:literal $($rest:tt)*]) => {
        $crate::__controller_metadata!(@cm $doc [$v] $dsc $fd :: [$($rest)*])
    };

    // desc: "..."
    (@cm $doc:tt $ver:tt [$($old:expr)?] $fd:tt :: [desc : $v:literal $($rest:tt)*]) => {
        $crate::__controller_metadata!(@cm $doc $ver [$v] $fd :: [$($rest)*])
    };

    // full_desc: "..."
    (@cm $doc:tt $ver:tt $dsc:tt [$($old:expr)?] :: [full_desc : $v:literal $($rest:tt)*]) => {
        $crate::__controller_metadata!(@cm $doc $ver $dsc [$v] :: [$($rest)*])
    };

    // End of tokens → emit
    (@cm [$($doc:expr)?] [$($ver:expr)?] [$($dsc:expr)?] [$($fd:expr)?] :: []) => {
        $crate::controller::ControllerMetadata {
            version:   $crate::__controller_metadata!(@get_ver [$($ver)?]),
            desc:      $crate::__controller_metadata!(@get_dsc [$($dsc)?]),
            full_desc: $crate::__controller_metadata!(@get_fd [$($fd)?] [$($doc)?]),
        }
    };

    (@get_ver []) => { ::std::env!("CARGO_PKG_VERSION") };
    (@get_ver [$ver:expr]) => { $ver };

    (@get_dsc []) => { "" };
    (@get_dsc [$dsc:expr]) => { $dsc };

    // explicit > doc > None
    (@get_fd [$fd:expr] [$($_doc:expr)?]) => { ::std::option::Option::Some($fd) };
    (@get_fd [] [$doc:expr]) => { ::std::option::Option::Some($doc) };
    (@get_fd [] []) => { ::std::option::Option::None };
}

// ─── define_controller! ───────────────────────────────────────────────────────

/// Creates a [`ControllerDescriptor`], the static `Copy` handle to a
/// controller.
///
/// # Syntax
///
/// ```rust,ignore
/// use switchyard::prelude::*;
///
/// /// Everything about users.
/// pub static USERS: ControllerDescriptor = define_controller! {
///     name: "users",
///
///     actions: [
///         action("users").get().handler(list_users),
///         action("users").get().params(["id"]).handler(get_user),
///     ],
///
///     metadata: {
///         version: "1.2.0",
///         desc:    "User lookup.",
///     },
/// };
/// ```
///
/// ## Field reference
///
/// | Field | Required | Description |
/// |-------|----------|-------------|
/// | `name` | ✓ | Must be **first**. Controller name and configuration key. |
/// | `actions` | — | `[expr, …]`, each an [`ActionDescriptor`] |
/// | `metadata` | — | `{ version, desc, full_desc }`; must be last |
///
/// Doc comments on the invocation become `full_desc` unless it is given
/// explicitly. `version` defaults to the calling crate's version.
///
/// [`ControllerDescriptor`]: crate::controller::ControllerDescriptor
/// [`ActionDescriptor`]: crate::ActionDescriptor
#[macro_export]
macro_rules! define_controller {
    // ── Entry: with doc comment ───────────────────────────────────────────────
    //
    // Accumulator slots:
    //   [$n]         controller name literal
    //   [$($a),*]    action expressions
    //   [$($doc)?]   doc literal
    ($(#[doc = $doc:literal])+ name: $name:literal, $($tail:tt)+) => {
        $crate::define_controller!(
            @acc [$name] [] [::std::concat!($($doc, " "),*)]
            $($tail)+
        )
    };

    ($(#[doc = $doc:literal])+ name: $name:literal $(,)?) => {
        $crate::define_controller!(
            @acc [$name] [] [::std::concat!($($doc, " "),*)]
        )
    };

    // ── Entry: no doc + more fields ───────────────────────────────────────────
    (name: $name:literal, $($tail:tt)+) => {
        $crate::define_controller!(@acc [$name] [] [] $($tail)+)
    };

    // ── Entry: name only ──────────────────────────────────────────────────────
    (name: $name:literal $(,)?) => {
        $crate::define_controller!(@acc [$name] [] [])
    };

    // ── Accumulator: skip stray commas ────────────────────────────────────────
    (@acc $n:tt $a:tt $doc:tt , $($rest:tt)*) => {
        $crate::define_controller!(@acc $n $a $doc $($rest)*)
    };

    // ── Consume actions: [expr, …] (once) ─────────────────────────────────────
    (@acc [$n:literal] [] $doc:tt actions: [$($na:expr),* $(,)?] $($rest:tt)*) => {
        $crate::define_controller!(@acc [$n] [$($na),*] $doc $($rest)*)
    };

    // ── Consume metadata: { … } ───────────────────────────────────────────────
    (@acc [$n:literal] [$($a:expr),*] [$($doc:expr)?] metadata: { $($meta:tt)* } $(,)?) => {
        $crate::define_controller!(@terminal [$n] [$($a),*] [$($doc)?] $($meta)*)
    };

    // ── No remaining fields → terminal ────────────────────────────────────────
    (@acc [$n:literal] [$($a:expr),*] [$($doc:expr)?]) => {
        $crate::define_controller!(@terminal [$n] [$($a),*] [$($doc)?])
    };

    // ── @terminal: emit the ControllerDescriptor ──────────────────────────────
    (@terminal [$n:literal] [$($a:expr),*] [$($doc:expr)?] $($meta:tt)*) => {{
        const __SWITCHYARD_META: $crate::controller::ControllerMetadata =
            $crate::__controller_metadata!(@parse [$($doc)?] $($meta)*);

        fn __switchyard_controller_create() -> $crate::controller::Controller {
            $crate::controller::Controller::__new(
                $n,
                ::std::vec![$($a),*],
                __SWITCHYARD_META,
            )
        }

        $crate::controller::ControllerDescriptor {
            name:     $n,
            create:   __switchyard_controller_create,
            metadata: __SWITCHYARD_META,
        }
    }};
}

#[cfg(test)]
mod tests {
    use crate::controller::ControllerDescriptor;
    use crate::descriptor::action;

    async fn ping() -> &'static str {
        "pong"
    }

    async fn echo(words: String) -> String {
        words
    }

    /// Health checks.
    static HEALTH: ControllerDescriptor = crate::define_controller! {
        /// Health checks.
        name: "health",
        actions: [
            action("ping").handler(ping),
            action("echo").params(["words"]).handler(echo),
        ],
        metadata: {
            version: "2.0.0",
            desc: "Liveness probes",
        },
    };

    /// Overridden below.
    static DETAILED: ControllerDescriptor = crate::define_controller! {
        /// Overridden below.
        name: "detailed",
        metadata: {
            full_desc: "Explicit description",
            desc: "Short",
        }
    };

    static BARE: ControllerDescriptor = crate::define_controller! {
        name: "bare",
    };

    #[test]
    fn descriptor_carries_name_and_metadata() {
        assert_eq!(HEALTH.name, "health");
        assert_eq!(HEALTH.metadata.version, "2.0.0");
        assert_eq!(HEALTH.metadata.desc, "Liveness probes");
        assert_eq!(HEALTH.metadata.full_desc, Some(" Health checks. "));
    }

    #[test]
    fn metadata_keys_in_any_order_override_defaults() {
        assert_eq!(DETAILED.metadata.desc, "Short");
        assert_eq!(DETAILED.metadata.full_desc, Some("Explicit description"));
        assert_eq!(DETAILED.metadata.version, env!("CARGO_PKG_VERSION"));
        assert!(DETAILED.instantiate().actions().is_empty());
    }

    #[test]
    fn create_builds_fresh_actions() {
        let controller = HEALTH.instantiate();
        assert_eq!(controller.name(), "health");
        assert_eq!(controller.actions().len(), 2);
        assert_eq!(controller.actions()[1].arity(), 1);
    }

    #[test]
    fn bare_controller_defaults() {
        assert_eq!(BARE.metadata.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(BARE.metadata.full_desc, None);
        assert!(BARE.instantiate().actions().is_empty());
    }
}
