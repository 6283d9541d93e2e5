//! Memory painting for uninitialized-memory detection
//!
//! Thread stacks are painted with [`STACK_FILL_VALUE`] and thread control
//! blocks with [`THREAD_FILL_VALUE`] before use. A debugger then shows which
//! fields were never written, and [`stack_unused`] gives the stack
//! high-water mark.

/// Fill value for thread stack areas
pub const STACK_FILL_VALUE: u8 = 0x55;

/// Fill value for thread control blocks.
///
/// 0xFF makes fields that were never initialized stand out in a memory view.
pub const THREAD_FILL_VALUE: u8 = 0xFF;

/// Paint `area` with `value`
#[inline]
pub fn fill(area: &mut [u8], value: u8) {
    area.fill(value);
}

/// Paint a stack area with [`STACK_FILL_VALUE`]
#[inline]
pub fn fill_stack(stack: &mut [u8]) {
    fill(stack, STACK_FILL_VALUE);
}

/// Paint a thread control block with [`THREAD_FILL_VALUE`]
#[inline]
pub fn fill_thread(area: &mut [u8]) {
    fill(area, THREAD_FILL_VALUE);
}

/// Bytes at the low end of a descending stack that still hold the fill value
pub fn stack_unused(stack: &[u8]) -> usize {
    stack
        .iter()
        .take_while(|&&byte| byte == STACK_FILL_VALUE)
        .count()
}

/// Deepest stack usage observed so far, in bytes
pub fn stack_used(stack: &[u8]) -> usize {
    stack.len() - stack_unused(stack)
}
