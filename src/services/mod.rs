pub mod upload_auth_service;
