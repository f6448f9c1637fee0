use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "campus-resources-api")]
#[command(about = "HTTP API for institutions, classes, learning resources and comments")]
#[command(version)]
pub struct ServerArgs {
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0", help = "Address to bind")]
    pub bind: String,

    #[arg(long, env = "PORT", default_value_t = 3000, help = "Port to listen on")]
    pub port: u16,
}

impl ServerArgs {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}
