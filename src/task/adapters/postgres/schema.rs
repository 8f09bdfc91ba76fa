//! Diesel schema for task persistence.

diesel::table! {
    /// Seeded status vocabulary.
    task_statuses (id) {
        /// Status identifier.
        id -> Int8,
        /// Unique status name.
        #[max_length = 20]
        name -> Varchar,
    }
}

diesel::table! {
    /// Task records.
    tasks (id) {
        /// Store-assigned task identifier.
        id -> Int8,
        /// Task title.
        #[max_length = 100]
        title -> Varchar,
        /// Optional free-form description.
        description -> Nullable<Text>,
        /// Owning user.
        owner_id -> Uuid,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only status history.
    task_status_history (id) {
        /// Store-assigned entry identifier.
        id -> Int8,
        /// When the status was recorded.
        created_at -> Timestamptz,
        /// Recorded status; null once the definition is removed.
        status_id -> Nullable<Int8>,
        /// Task the entry belongs to.
        task_id -> Int8,
    }
}

diesel::joinable!(task_status_history -> task_statuses (status_id));
diesel::joinable!(task_status_history -> tasks (task_id));

diesel::allow_tables_to_appear_in_same_query!(task_statuses, tasks, task_status_history);
