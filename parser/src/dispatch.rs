//! Action dispatch: applies one matched option against its bound target.

use plotargs_core::{HandlerOutcome, OptAction, OptionDescriptor};

use crate::error::ParseError;

/// Applies the descriptor's action.
///
/// `value` is `Some` exactly when the descriptor requires a value; the
/// session extracts it before dispatching. Numeric parsing is lenient:
/// malformed text stores zero rather than failing, matching the classic
/// atoi/atof contract the tables were written against.
pub(crate) fn apply_action(
    desc: &OptionDescriptor,
    value: Option<&str>,
) -> Result<HandlerOutcome, ParseError> {
    match &desc.action {
        OptAction::Call(handler) => {
            handler(&desc.name, value).map_err(|message| ParseError::HandlerFailed {
                option: desc.name.clone(),
                message,
            })
        }
        OptAction::SetBool(flag) => {
            flag.set(true);
            Ok(HandlerOutcome::Continue)
        }
        OptAction::ParseInt(target) => {
            target.set(parse_int_lenient(value.unwrap_or("")));
            Ok(HandlerOutcome::Continue)
        }
        OptAction::ParseFloat(target) => {
            target.set(parse_float_lenient(value.unwrap_or("")));
            Ok(HandlerOutcome::Continue)
        }
        OptAction::StoreString(slot) => {
            *slot.borrow_mut() = Some(value.unwrap_or("").to_string());
            Ok(HandlerOutcome::Continue)
        }
    }
}

/// Integer parsing where malformed text yields zero.
pub(crate) fn parse_int_lenient(text: &str) -> i64 {
    text.trim().parse().unwrap_or(0)
}

/// Float parsing where malformed text yields zero.
pub(crate) fn parse_float_lenient(text: &str) -> f64 {
    text.trim().parse().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use super::*;

    #[test]
    fn test_lenient_numeric_parsing() {
        assert_eq!(parse_int_lenient("42"), 42);
        assert_eq!(parse_int_lenient(" -3 "), -3);
        assert_eq!(parse_int_lenient("nonsense"), 0);
        assert_eq!(parse_int_lenient(""), 0);

        assert_eq!(parse_float_lenient("-0.5"), -0.5);
        assert_eq!(parse_float_lenient("1e3"), 1000.0);
        assert_eq!(parse_float_lenient("nonsense"), 0.0);
    }

    #[test]
    fn test_store_string_overwrites_previous_value() {
        let slot = Rc::new(RefCell::new(Some("old".to_string())));
        let desc = OptionDescriptor::string("dev", Rc::clone(&slot));

        apply_action(&desc, Some("png")).expect("store should succeed");
        assert_eq!(slot.borrow().as_deref(), Some("png"));
    }

    #[test]
    fn test_handler_failure_carries_option_name() {
        let desc = OptionDescriptor::handler("width", |_, _| Err("invalid width".to_string()))
            .expects_value();

        let err = apply_action(&desc, Some("0")).expect_err("handler should fail");
        match err {
            ParseError::HandlerFailed { option, message } => {
                assert_eq!(option, "width");
                assert_eq!(message, "invalid width");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_set_bool_ignores_value() {
        let flag = Rc::new(Cell::new(false));
        let desc = OptionDescriptor::boolean("np", Rc::clone(&flag));

        apply_action(&desc, None).expect("boolean set should succeed");
        assert!(flag.get());
    }
}
