pub mod aliases {
    pub type Fallible<T> = ::anyhow::Result<T>;
}
