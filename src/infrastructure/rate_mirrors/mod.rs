pub mod http_mirror;
