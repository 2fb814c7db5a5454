diesel::table! {
    users (id) {
        id -> Int8,
        created -> Timestamp,
        updated -> Nullable<Timestamp>,
        #[max_length = 254]
        email -> Varchar,
        #[max_length = 20]
        first_name -> Varchar,
        #[max_length = 20]
        last_name -> Nullable<Varchar>,
        birthday -> Date,
        avatar -> Nullable<Text>,
        password_hash -> Text,
        is_staff -> Bool,
    }
}

diesel::table! {
    categories (id) {
        id -> Int4,
        created -> Timestamp,
        #[max_length = 256]
        title -> Varchar,
        description -> Text,
        #[max_length = 64]
        slug -> Varchar,
        is_published -> Bool,
    }
}

diesel::table! {
    locations (id) {
        id -> Int4,
        created -> Timestamp,
        #[max_length = 256]
        name -> Varchar,
        is_published -> Bool,
    }
}

diesel::table! {
    tags (id) {
        id -> Int4,
        #[max_length = 20]
        tag -> Varchar,
    }
}

diesel::table! {
    posts (id) {
        id -> Int8,
        created -> Timestamp,
        #[max_length = 256]
        title -> Varchar,
        text -> Text,
        pub_date -> Timestamp,
        author_id -> Int8,
        category_id -> Nullable<Int4>,
        location_id -> Nullable<Int4>,
        image -> Nullable<Text>,
        is_published -> Bool,
    }
}

diesel::table! {
    post_tags (post_id, tag_id) {
        post_id -> Int8,
        tag_id -> Int4,
    }
}

diesel::table! {
    comments (id) {
        id -> Int8,
        created -> Timestamp,
        text -> Text,
        author_id -> Int8,
        post_id -> Int8,
    }
}

diesel::joinable!(posts -> users (author_id));
diesel::joinable!(posts -> categories (category_id));
diesel::joinable!(posts -> locations (location_id));
diesel::joinable!(comments -> posts (post_id));
diesel::joinable!(comments -> users (author_id));
diesel::joinable!(post_tags -> posts (post_id));
diesel::joinable!(post_tags -> tags (tag_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    categories,
    locations,
    tags,
    posts,
    post_tags,
    comments,
);
