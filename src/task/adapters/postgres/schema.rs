//! Diesel schema for the hosted task table.

diesel::table! {
    /// Task records shown on the board.
    todotasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Task title.
        title -> Text,
        /// Optional free-text description.
        description -> Nullable<Text>,
        /// Workflow status (`todo`, `progress`, `done`).
        #[max_length = 20]
        status -> Varchar,
        /// Optional assignee.
        assigned_to -> Nullable<Text>,
        /// Optional due date.
        due_date -> Nullable<Date>,
        /// Priority (`low`, `medium`, `high`).
        #[max_length = 20]
        priority -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}
