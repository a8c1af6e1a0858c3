pub(crate) mod hostname;
pub(crate) mod run;

pub(crate) use hostname::HostnameUseCase;
pub(crate) use run::RunUseCase;
