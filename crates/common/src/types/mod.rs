use serde::Serialize;

#[derive(Serialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Generic `{ "result": ... }` envelope used by write endpoints.
#[derive(Serialize, Debug)]
pub struct ActionResult<T: Serialize> {
    pub result: T,
}

impl<T: Serialize> ActionResult<T> {
    pub fn new(result: T) -> Self { Self { result } }
}
