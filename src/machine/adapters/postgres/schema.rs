//! Diesel schema for machine persistence.

diesel::table! {
    /// Machine records and their floor-block placement.
    machines (id) {
        /// Machine identifier.
        id -> Uuid,
        /// Display name.
        name -> Text,
        /// Free-text status label.
        status -> Text,
        /// Completion flag; completed machines do not occupy a block.
        completed -> Bool,
        /// Optional master-card document path.
        master_card_info -> Nullable<Text>,
        /// Optional electric-drawing document path.
        electric_drawing_path -> Nullable<Text>,
        /// Shop-floor machine number.
        machine_no -> Text,
        /// Model designation.
        model -> Text,
        /// Product number.
        product_no -> Text,
        /// Floor block number.
        block_no -> Int4,
    }
}
