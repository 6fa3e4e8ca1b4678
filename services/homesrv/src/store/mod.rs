//! File-backed showcase dataset

mod mock_data;

pub use mock_data::{MockStore, NewMockUser, UserView};
