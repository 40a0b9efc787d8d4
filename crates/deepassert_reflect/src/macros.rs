//! `reflect_struct!` macro for plain structs.

/// Implements [`Reflect`](crate::Reflect) and [`Struct`](crate::Struct) for a
/// struct whose members all implement [`ToValue`](crate::ToValue).
///
/// Members are exposed in the listed order under their Rust names.
///
/// ```rust
/// use deepassert_reflect::{reflect_struct, Struct};
///
/// struct Book {
///     title: String,
///     pages: u32,
/// }
///
/// reflect_struct!(Book { title, pages });
///
/// let book = Book { title: "Refactoring".into(), pages: 448 };
/// let names: Vec<_> = book.fields().into_iter().map(|field| field.name).collect();
/// assert_eq!(names, ["title", "pages"]);
/// ```
#[macro_export]
macro_rules! reflect_struct {
    ($ty:ty { $($field:ident),* $(,)? }) => {
        impl $crate::Reflect for $ty {
            fn shape(&self) -> $crate::Shape<'_> {
                $crate::Shape::Struct(self)
            }
        }

        impl $crate::Struct for $ty {
            fn fields(&self) -> ::std::vec::Vec<$crate::Field> {
                ::std::vec![$($crate::Field::of(::std::stringify!($field), &self.$field)),*]
            }
        }
    };
}
