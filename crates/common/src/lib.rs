pub mod types;
pub mod utils;
pub mod env;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health::ok();
        assert_eq!(h.status, "ok");
    }

    #[test]
    fn message_wraps_detail() {
        let m = types::Message::new("Note groceries deleted");
        assert_eq!(m.detail, "Note groceries deleted");
    }
}
