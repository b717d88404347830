diesel::table! {
    instructors (id) {
        id -> Int8,
        full_name -> Text,
        role -> Text,
    }
}

diesel::table! {
    laboratories (id) {
        id -> Int8,
        name -> Text,
        capacity -> Int4,
    }
}

diesel::table! {
    courses (id) {
        id -> Int8,
        code -> Text,
        name -> Text,
        semester -> Nullable<Int4>,
        credits -> Nullable<Int4>,
    }
}

diesel::table! {
    assignments (id) {
        id -> Int8,
        course_id -> Int8,
        instructor_id -> Int8,
        lab_id -> Int8,
        day -> Text,
        time_slot -> Text,
        section -> Nullable<Text>,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(assignments -> courses (course_id));
diesel::joinable!(assignments -> instructors (instructor_id));
diesel::joinable!(assignments -> laboratories (lab_id));

diesel::allow_tables_to_appear_in_same_query!(assignments, courses, instructors, laboratories,);
