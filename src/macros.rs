// src/macros.rs
#[macro_export]
macro_rules! s {
    // String shorthand!

    // Zero-arg → String::new()
    () => {
        ::std::string::String::new()
    };
    // Any single expression: works for literals, consts, or vars
    ($expr:expr) => {
        ::std::string::String::from($expr)
    };
}

#[macro_export]
macro_rules! vocab {
    // Ordered vocabulary shorthand!
    //   vocab!(pub ELEMENTS, "elements", ["fire", "water"]);
    ($vis:vis $ident:ident, $name:literal, [$($token:literal),+ $(,)?]) => {
        $vis const $ident: $crate::config::vocab::Vocabulary =
            $crate::config::vocab::Vocabulary::new($name, &[$($token),+]);
    };
}
