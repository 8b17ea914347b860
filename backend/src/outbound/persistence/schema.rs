//! Diesel schema for the relational tables this service reads.
//!
//! Both tables are owned and migrated by the accounts service; only the
//! columns needed for existence probes are declared here.

diesel::table! {
    users (id) {
        id -> Uuid,
        display_name -> Text,
    }
}

diesel::table! {
    teams (id) {
        id -> Uuid,
        name -> Text,
    }
}

diesel::allow_tables_to_appear_in_same_query!(users, teams);
