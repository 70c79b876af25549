use slotmap::new_key_type;

new_key_type! {
    /// Identifies an entity in the world store.
    ///
    /// Generational: a removed entity's slot may be recycled, but the old
    /// handle never resolves to the new occupant.
    pub struct EntityId;
}
