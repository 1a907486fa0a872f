//! Functional areas of the application

use crate::errors::MandatoError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Module key used by the permission matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Module {
    Dashboard,
    /// Staff registry
    Equipe,
    /// General registries (voters, leaderships)
    Cadastros,
    /// Budget earmarks
    Emendas,
    Financeiro,
    Geolocalizacao,
    Mensagens,
    Agenda,
    Aniversariantes,
    Documentos,
    /// Service requests
    Atendimentos,
    /// User management
    Usuarios,
    Juridico,
    DisparoMassa,
}

impl Module {
    pub const ALL: [Module; 14] = [
        Module::Dashboard,
        Module::Equipe,
        Module::Cadastros,
        Module::Emendas,
        Module::Financeiro,
        Module::Geolocalizacao,
        Module::Mensagens,
        Module::Agenda,
        Module::Aniversariantes,
        Module::Documentos,
        Module::Atendimentos,
        Module::Usuarios,
        Module::Juridico,
        Module::DisparoMassa,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Module::Dashboard => "DASHBOARD",
            Module::Equipe => "EQUIPE",
            Module::Cadastros => "CADASTROS",
            Module::Emendas => "EMENDAS",
            Module::Financeiro => "FINANCEIRO",
            Module::Geolocalizacao => "GEOLOCALIZACAO",
            Module::Mensagens => "MENSAGENS",
            Module::Agenda => "AGENDA",
            Module::Aniversariantes => "ANIVERSARIANTES",
            Module::Documentos => "DOCUMENTOS",
            Module::Atendimentos => "ATENDIMENTOS",
            Module::Usuarios => "USUARIOS",
            Module::Juridico => "JURIDICO",
            Module::DisparoMassa => "DISPARO_MASSA",
        }
    }

    /// Menu label
    pub fn label(self) -> &'static str {
        match self {
            Module::Dashboard => "Dashboard",
            Module::Equipe => "Equipe",
            Module::Cadastros => "Cadastros",
            Module::Emendas => "Emendas",
            Module::Financeiro => "Financeiro",
            Module::Geolocalizacao => "Geolocalização",
            Module::Mensagens => "Mensagens",
            Module::Agenda => "Agenda",
            Module::Aniversariantes => "Aniversariantes",
            Module::Documentos => "Documentos",
            Module::Atendimentos => "Atendimentos",
            Module::Usuarios => "Usuários",
            Module::Juridico => "Jurídico",
            Module::DisparoMassa => "Disparo em Massa",
        }
    }

    pub fn parse(value: &str) -> Option<Module> {
        value.parse().ok()
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Module {
    type Err = MandatoError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Module::ALL
            .into_iter()
            .find(|module| module.as_str() == value)
            .ok_or_else(|| MandatoError::UnknownModule(value.to_string()))
    }
}
