use pretty_assertions::assert_eq;
use serial_test::serial;

use albapay::Config;

fn clear_env() {
    unsafe {
        std::env::remove_var("DATABASE_URL");
        std::env::remove_var("ENVIRONMENT");
        std::env::remove_var("HOLIDAY_DATA_PATH");
    }
}

#[test]
#[serial]
fn defaults_fill_missing_values() {
    clear_env();

    let config = Config::from_env().unwrap();
    assert_eq!(config.database_url, "sqlite:albapay.db");
    assert_eq!(config.environment, "development");
    assert_eq!(config.holiday_data_path, "data/holidays.json");
    assert!(!config.is_production());
}

#[test]
#[serial]
fn environment_variables_take_precedence() {
    clear_env();
    unsafe {
        std::env::set_var("DATABASE_URL", "sqlite:/var/lib/albapay/prod.db");
        std::env::set_var("ENVIRONMENT", "production");
        std::env::set_var("HOLIDAY_DATA_PATH", "/srv/albapay/holidays.json");
    }

    let config = Config::from_env().unwrap();
    assert_eq!(config.database_url, "sqlite:/var/lib/albapay/prod.db");
    assert_eq!(config.holiday_data_path, "/srv/albapay/holidays.json");
    assert!(config.is_production());

    clear_env();
}
