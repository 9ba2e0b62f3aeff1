// Hardware collaborator abstractions
pub mod net;
