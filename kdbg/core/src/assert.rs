//! Parameter checks and assertions
//!
//! Both macros halt through [`crate::halt`] with the name of the enclosing
//! function. When their feature is off the condition is not evaluated at
//! all, so conditions must be free of side effects.

/// Path of the enclosing function, as a `&'static str`.
///
/// ```
/// fn ch_sem_signal_i() -> &'static str {
///     kdbg_core::function_name!()
/// }
/// assert!(ch_sem_signal_i().ends_with("ch_sem_signal_i"));
/// ```
#[macro_export]
macro_rules! function_name {
    () => {{
        fn __here() {}
        fn __type_name_of<T>(_: T) -> &'static str {
            ::core::any::type_name::<T>()
        }
        let name = __type_name_of(__here);
        match name.strip_suffix("::__here") {
            Some(name) => name,
            None => name,
        }
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __halt_unless {
    ($enabled:expr, $cond:expr) => {
        if $enabled {
            if !($cond) {
                $crate::halt($crate::function_name!());
            }
        }
    };
}

/// Function parameter check.
///
/// Active with the `checks` feature. Intended at API boundaries for
/// caller-supplied arguments.
///
#[cfg_attr(feature = "checks", doc = "```should_panic")]
#[cfg_attr(not(feature = "checks"), doc = "```")]
/// fn ch_thd_sleep(ticks: u32) {
///     kdbg_core::dbg_check!(ticks != 0);
/// }
/// ch_thd_sleep(0);
/// ```
#[macro_export]
macro_rules! dbg_check {
    ($cond:expr $(,)?) => {
        $crate::__halt_unless!($crate::CHECKS_ENABLED, $cond)
    };
}

/// Condition assertion.
///
/// Active with the `asserts` feature. The remark documents the invariant in
/// the source and is not used at runtime.
#[macro_export]
macro_rules! dbg_assert {
    ($cond:expr, $remark:expr $(,)?) => {
        $crate::__halt_unless!($crate::ASSERTS_ENABLED, $cond)
    };
}
