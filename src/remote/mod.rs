// Remote list/log server — persistence shared across clients.

pub mod client;
