//! Arity-generic call abstraction.
//!
//! Arguments travel as a tuple so wrappers can stay generic over arity.
//! Every `Fn` up to eight arguments gets a blanket impl; the wrappers
//! then implement [`Callable`] themselves, which is what lets them nest
//! in any order.

/// Something invocable with a tuple of arguments.
pub trait Callable<Args> {
    type Output;

    /// Invoke with `args`. Must behave exactly like the underlying
    /// call: same output, same panic.
    fn call(&self, args: Args) -> Self::Output;
}

macro_rules! impl_callable {
    ($($arg:ident),*) => {
        impl<Func, Out, $($arg),*> Callable<($($arg,)*)> for Func
        where
            Func: Fn($($arg),*) -> Out,
        {
            type Output = Out;

            #[allow(non_snake_case)]
            fn call(&self, ($($arg,)*): ($($arg,)*)) -> Out {
                self($($arg),*)
            }
        }
    };
}

impl_callable!();
impl_callable!(A1);
impl_callable!(A1, A2);
impl_callable!(A1, A2, A3);
impl_callable!(A1, A2, A3, A4);
impl_callable!(A1, A2, A3, A4, A5);
impl_callable!(A1, A2, A3, A4, A5, A6);
impl_callable!(A1, A2, A3, A4, A5, A6, A7);
impl_callable!(A1, A2, A3, A4, A5, A6, A7, A8);
