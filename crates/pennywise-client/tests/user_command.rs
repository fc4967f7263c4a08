mod support;

use pennywise_client::commands::user::{self, UserListOptions, UserRegisterOptions, UserShowOptions};
use support::ledger_testkit::{payload, register, rows, temp_home_in_tmp};

#[test]
fn register_then_show_returns_the_same_profile() {
    let temp = temp_home_in_tmp("pennywise-user-show");
    assert!(temp.is_ok());
    if let Ok((_guard, home)) = temp {
        let registered = register(&home, "alice");
        assert_eq!(registered["command"], "user register");
        assert_eq!(registered["data"]["user"]["username"], "alice");

        let shown = payload(user::show(UserShowOptions {
            user: Some("alice".to_string()),
            home_override: Some(&home),
        }));
        assert_eq!(
            shown["data"]["user"]["user_id"],
            registered["data"]["user"]["user_id"]
        );
        assert_eq!(shown["data"]["user"]["email"], "alice@example.com");
    }
}

#[test]
fn duplicate_username_and_email_are_rejected() {
    let temp = temp_home_in_tmp("pennywise-user-duplicate");
    assert!(temp.is_ok());
    if let Ok((_guard, home)) = temp {
        register(&home, "alice");

        let same_name = user::register(UserRegisterOptions {
            username: "alice".to_string(),
            email: "other@example.com".to_string(),
            home_override: Some(&home),
        });
        assert!(same_name.is_err());
        if let Err(error) = same_name {
            assert_eq!(error.code, "user_exists");
            assert_eq!(error.data.as_ref().map(|data| data["field"].clone()), Some("username".into()));
        }

        let same_email = user::register(UserRegisterOptions {
            username: "alicia".to_string(),
            email: "alice@example.com".to_string(),
            home_override: Some(&home),
        });
        assert!(same_email.is_err());
        if let Err(error) = same_email {
            assert_eq!(error.code, "user_exists");
            assert_eq!(error.data.as_ref().map(|data| data["field"].clone()), Some("email".into()));
        }
    }
}

#[test]
fn register_validates_username_and_email() {
    let temp = temp_home_in_tmp("pennywise-user-invalid");
    assert!(temp.is_ok());
    if let Ok((_guard, home)) = temp {
        let blank = user::register(UserRegisterOptions {
            username: "   ".to_string(),
            email: "a@example.com".to_string(),
            home_override: Some(&home),
        });
        assert!(matches!(blank, Err(ref error) if error.code == "invalid_argument"));

        let bad_email = user::register(UserRegisterOptions {
            username: "bob".to_string(),
            email: "not-an-address".to_string(),
            home_override: Some(&home),
        });
        assert!(matches!(bad_email, Err(ref error) if error.code == "invalid_argument"));
    }
}

#[test]
fn unknown_user_is_reported() {
    let temp = temp_home_in_tmp("pennywise-user-missing");
    assert!(temp.is_ok());
    if let Ok((_guard, home)) = temp {
        let shown = user::show(UserShowOptions {
            user: Some("ghost".to_string()),
            home_override: Some(&home),
        });
        assert!(shown.is_err());
        if let Err(error) = shown {
            assert_eq!(error.code, "user_not_found");
            assert!(error.message.contains("ghost"));
        }
    }
}

#[test]
fn list_returns_every_registered_user() {
    let temp = temp_home_in_tmp("pennywise-user-list");
    assert!(temp.is_ok());
    if let Ok((_guard, home)) = temp {
        register(&home, "alice");
        register(&home, "bob");

        let listed = payload(user::list(UserListOptions {
            home_override: Some(&home),
        }));
        let names = rows(&listed)
            .iter()
            .filter_map(|row| row["username"].as_str().map(str::to_string))
            .collect::<Vec<_>>();
        assert_eq!(names.len(), 2);
        assert!(names.contains(&"alice".to_string()));
        assert!(names.contains(&"bob".to_string()));
    }
}
