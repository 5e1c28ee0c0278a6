use crate::core::errors::ElementCastError;
use num_traits::{NumCast, ToPrimitive};
use std::{any::type_name, fmt::Debug};

pub(crate) fn cast_element<T, U>(value: T) -> Result<U, ElementCastError>
where
    T: ToPrimitive + Debug + Copy,
    U: NumCast,
{
    <U as NumCast>::from(value).ok_or_else(|| ElementCastError {
        value: format!("{value:?}"),
        from: type_name::<T>(),
        to: type_name::<U>(),
    })
}
