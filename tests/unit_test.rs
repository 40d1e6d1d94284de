// Unit tests for user-dashboard
// These tests work with the public API only

#[cfg(test)]
mod wizard_tests {
    use user_dashboard::app::{Field, FormRecord, Step, Wizard, wizard::validate};

    fn fill_identity(w: &mut Wizard) {
        w.update_field(Field::Name, "Jane Doe");
        w.update_field(Field::Email, "jane@example.com");
    }

    #[test]
    fn test_initial_state() {
        let w = Wizard::new();
        assert_eq!(w.step(), Step::Identity);
        assert_eq!(w.step().number(), 1);
        assert!(w.errors().is_empty());
        assert!(!w.submitted());
        assert_eq!(w.form(), &FormRecord::default());
    }

    #[test]
    fn test_blank_names_fail_step_one() {
        for name in ["", " ", "\t\n", "   "] {
            let mut w = Wizard::new();
            w.update_field(Field::Name, name);
            w.update_field(Field::Email, "a@b.com");
            assert!(!w.validate_current_step(), "{name:?} accepted");
            assert_eq!(w.errors().get(Field::Name), Some("Name is required"));
        }
    }

    #[test]
    fn test_email_pattern_samples() {
        let cases = [
            ("a@b", false),
            ("a@b.com", true),
            ("@b.com", false),
            ("a@.com", false),
            ("a@b.", false),
            ("john.smith+news@mail.co.uk", true),
            ("no at sign.com", false),
        ];
        for (email, ok) in cases {
            let form = FormRecord { name: "x".into(), email: email.into(), ..FormRecord::default() };
            let errors = validate(&form, Step::Identity);
            if ok {
                assert!(errors.is_empty(), "{email} rejected");
            } else {
                assert_eq!(errors.get(Field::Email), Some("Invalid email"), "{email}");
            }
        }
    }

    #[test]
    fn test_advance_blocked_then_allowed() {
        let mut w = Wizard::new();
        w.update_field(Field::Email, "nope");
        w.advance();
        assert_eq!(w.step(), Step::Identity);
        assert_eq!(w.errors().get(Field::Name), Some("Name is required"));
        assert_eq!(w.errors().get(Field::Email), Some("Invalid email"));

        fill_identity(&mut w);
        w.advance();
        assert_eq!(w.step(), Step::Address);
    }

    #[test]
    fn test_address_step_blocks_until_filled() {
        let mut w = Wizard::new();
        fill_identity(&mut w);
        w.advance();
        w.update_field(Field::Street, "1 Main St");
        w.advance();
        assert_eq!(w.step(), Step::Address);
        let missing: Vec<Field> = w.errors().iter().map(|(f, _)| f).collect();
        assert_eq!(missing, [Field::City, Field::Zip]);
    }

    #[test]
    fn test_retreat_ignores_validity() {
        let mut w = Wizard::new();
        fill_identity(&mut w);
        w.advance();
        w.update_field(Field::Email, "broken");
        w.retreat();
        assert_eq!(w.step(), Step::Identity);
    }

    #[test]
    fn test_full_scenario() {
        let mut w = Wizard::new();
        fill_identity(&mut w);
        w.advance();
        w.update_field(Field::Street, "1 Main St");
        w.update_field(Field::City, "Springfield");
        w.update_field(Field::Zip, "12345");
        w.advance();
        assert_eq!(w.step(), Step::Review);
        let f = w.form();
        assert_eq!(
            (f.name.as_str(), f.email.as_str(), f.street.as_str(), f.city.as_str(), f.zip.as_str()),
            ("Jane Doe", "jane@example.com", "1 Main St", "Springfield", "12345")
        );
        assert!(w.submit());
        assert!(w.submitted());
    }
}

#[cfg(test)]
mod search_tests {
    use user_dashboard::api::{Address, UserRecord};
    use user_dashboard::search::{filtered_view, matches};

    fn user(id: u64, name: &str, city: &str) -> UserRecord {
        UserRecord {
            id,
            name: name.into(),
            email: "x@y.z".into(),
            phone: "0".into(),
            address: Address { city: city.into() },
        }
    }

    #[test]
    fn test_city_query_over_fixture() {
        let users = vec![
            user(1, "Mattie City", "Paris"),
            user(2, "Ann Lee", "Carson City"),
            user(3, "Bob Stone", "Oslo"),
        ];
        let ids: Vec<u64> = filtered_view(&users, "city").map(|u| u.id).collect();
        assert_eq!(ids, [1, 2]);
        assert!(!matches(&users[2], "city"));
    }

    #[test]
    fn test_idempotent_and_empty() {
        let users = vec![user(1, "A", "London"), user(2, "B", "london"), user(3, "C", "Rome")];
        let first: Vec<u64> = filtered_view(&users, "LonDon").map(|u| u.id).collect();
        let second: Vec<u64> = filtered_view(&users, "LonDon").map(|u| u.id).collect();
        assert_eq!(first, [1, 2]);
        assert_eq!(first, second);
        assert_eq!(filtered_view(&users, "").count(), 3);
    }
}

#[cfg(test)]
mod error_tests {
    use user_dashboard::error::{SimpleError, simple_error};

    #[test]
    fn test_simple_error_display() {
        assert_eq!(SimpleError::new("boom").to_string(), "boom");
        assert_eq!(simple_error("HTTP 500").to_string(), "HTTP 500");
    }
}
