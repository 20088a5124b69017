pub mod http_wallet_gateway;
