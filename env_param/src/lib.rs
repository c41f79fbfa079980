//! Global parameters whose value can be overridden from an environment variable.
//!
//! An [`EnvParam`] associates the name of an environment variable with the textual representation of a
//! default value. It is meant for knobs of an algorithm that are useful when debugging or analyzing a run
//! but that do not deserve a place in the public API of a crate.
//!
//! ```
//! use env_param::EnvParam;
//! static KEEP_EVERYTHING: EnvParam<bool> = EnvParam::new("DOC_KEEP_EVERYTHING", "false");
//!
//! // environment variable not set, the default value is used
//! assert!(!KEEP_EVERYTHING.get());
//! ```
//!
//! The value is read once, on first access. Changes to the environment made afterwards are ignored.
//!
//! ```
//! use env_param::EnvParam;
//! static BIAS: EnvParam<u32> = EnvParam::new("DOC_BIAS", "10");
//!
//! std::env::set_var("DOC_BIAS", "42");
//! assert_eq!(BIAS.get(), 42);
//! std::env::set_var("DOC_BIAS", "7"); // after first read, ignored
//! assert_eq!(BIAS.get(), 42);
//! ```
//!
//! [`EnvParam::set`] forces the value programmatically, provided the parameter was never read before.

use once_cell::sync::OnceCell;
use std::str::FromStr;

pub struct EnvParam<T> {
    value: OnceCell<T>,
    env: &'static str,
    default: &'static str,
}

impl<T> EnvParam<T> {
    /// Declares a parameter read from the environment variable `env`, falling back to `default`.
    pub const fn new(env: &'static str, default: &'static str) -> EnvParam<T> {
        EnvParam {
            value: OnceCell::new(),
            env,
            default,
        }
    }

    /// Name of the environment variable backing this parameter.
    pub fn name(&self) -> &'static str {
        self.env
    }

    /// Textual representation of the default value.
    pub fn default_value(&self) -> &'static str {
        self.default
    }
}

impl<T: FromStr> EnvParam<T> {
    fn parse_default(&self) -> T {
        match T::from_str(self.default) {
            Ok(v) => v,
            Err(_) => panic!("[env_param] {}: invalid default value \"{}\".", self.env, self.default),
        }
    }

    fn read(&self) -> T {
        match std::env::var(self.env) {
            Ok(text) => match T::from_str(text.trim()) {
                Ok(value) => value,
                Err(_) => {
                    eprintln!(
                        "[env_param] WARNING: could not parse \"{}\" for environment variable \"{}\". Using default: \"{}\"",
                        text, self.env, self.default
                    );
                    self.parse_default()
                }
            },
            Err(std::env::VarError::NotPresent) => self.parse_default(),
            Err(err) => {
                eprintln!("[env_param] {}: {}. Using default: \"{}\"", self.env, err, self.default);
                self.parse_default()
            }
        }
    }

    /// Returns the value of the parameter, reading the environment variable on first access.
    ///
    /// # Panic
    /// Panics if the environment variable is unset or invalid and the default value cannot be parsed.
    pub fn get(&self) -> T
    where
        T: Copy,
    {
        *self.get_ref()
    }

    /// Same as [`EnvParam::get`] for values that are not `Copy`.
    pub fn get_ref(&self) -> &T {
        self.value.get_or_init(|| self.read())
    }

    /// Sets the parameter to the given value.
    ///
    /// # Panic
    /// Panics if the parameter was already initialized, typically because it was read before.
    pub fn set(&self, value: T) {
        if self.value.set(value).is_err() {
            panic!("Parameter {} is already initialized (i.e. was previously accessed).", self.env);
        }
    }
}

#[cfg(test)]
mod test {
    use super::EnvParam;

    #[test]
    fn test_default_value() {
        static PARAM: EnvParam<u32> = EnvParam::new("ENV_PARAM_TEST_DEFAULT", "17");
        assert_eq!(PARAM.name(), "ENV_PARAM_TEST_DEFAULT");
        assert_eq!(PARAM.default_value(), "17");
        assert_eq!(PARAM.get(), 17);
    }

    #[test]
    fn test_unparsable_value_falls_back_to_default() {
        static PARAM: EnvParam<bool> = EnvParam::new("ENV_PARAM_TEST_INVALID", "true");
        std::env::set_var("ENV_PARAM_TEST_INVALID", "not-a-bool");
        assert!(PARAM.get());
    }

    #[test]
    fn test_set_before_read() {
        static PARAM: EnvParam<u32> = EnvParam::new("ENV_PARAM_TEST_SET", "0");
        PARAM.set(5);
        assert_eq!(PARAM.get(), 5);
    }

    #[test]
    #[should_panic]
    fn test_set_after_read() {
        static PARAM: EnvParam<u32> = EnvParam::new("ENV_PARAM_TEST_SET_AFTER_READ", "0");
        let _ = PARAM.get();
        PARAM.set(5);
    }
}
