pub mod mock_api;
pub mod mock_data;
pub mod mock_socket;
