//! 测试用的文档样例

use axum::Router;
use serde_json::{json, Map, Value};

use super::catalog::SectionId;

/// 包含全部 15 个章节的文档
pub fn full_documentation() -> Value {
    json!({
        "Overview": { "description": "Spring PetClinic is a sample Spring Boot application." },
        "GettingStarted": {
            "Prerequisites": ["Java 17", "Maven 3.9"],
            "SetupInstructions": ["git clone https://github.com/spring-projects/spring-petclinic"],
            "RunInstructions": ["./mvnw spring-boot:run"],
            "ExampleUsage": ["Open http://localhost:8080"]
        },
        "CodeStructureOverview": {
            "FileOrganization": [
                { "name": "src", "type": "folder", "children": [
                    { "name": "PetClinicApplication.java", "type": "file" }
                ]},
                { "name": "pom.xml", "type": "file" }
            ],
            "ModuleBreakdown": { "owner": "Owner and pet management", "vet": "Veterinarian listing" }
        },
        "KeyCodeComponents": {
            "Classes": [{
                "className": "OwnerController",
                "description": "Handles owner pages.",
                "constructors": [{
                    "parameters": [{ "name": "owners", "type": "OwnerRepository", "description": "Repository" }],
                    "description": "Injects the repository."
                }],
                "methods": [{
                    "methodName": "findOwner",
                    "parameters": [{ "name": "ownerId", "type": "int", "description": "Owner id" }],
                    "returnType": "Owner",
                    "description": "Loads an owner.",
                    "exampleUsage": "controller.findOwner(1)"
                }]
            }],
            "DataStructures": [{
                "name": "Owner",
                "type": "Entity",
                "purpose": "Pet owner record",
                "assumptions": ["telephone is numeric"]
            }]
        },
        "FunctionsAndAPIDocumentation": {
            "Functions": [{
                "functionName": "processFindForm",
                "signature": "String processFindForm(int page, Owner owner)",
                "description": "Searches owners by last name.",
                "exampleInput": "lastName=Davis",
                "exampleOutput": "owners/ownersList",
                "sideEffects": "None"
            }],
            "APIEndpoints": [{
                "endpoint": "/owners/{ownerId}",
                "method": "GET",
                "description": "Show an owner.",
                "parameters": [{ "name": "ownerId", "type": "int", "required": true, "description": "Owner id" }],
                "response": {
                    "statusCodes": ["200", "404"],
                    "dataFormat": "text/html",
                    "exampleResponse": "<html>...</html>"
                }
            }]
        },
        "ErrorHandlingAndLogging": {
            "ExceptionHandling": "Controller advice renders an error page.",
            "ErrorCodes": [{ "code": "404", "description": "Owner not found" }],
            "Logging": "Logback with default configuration."
        },
        "Dependencies": {
            "ExternalLibraries": [{ "library": "spring-boot-starter-web", "version": "3.2.0" }],
            "InternalDependencies": ["owner depends on model"]
        },
        "Configuration": {
            "ConfigurationFiles": [{ "name": "application.properties", "description": "Main settings" }],
            "EnvironmentVariables": [{ "variable": "SPRING_PROFILES_ACTIVE", "description": "Profile to use" }]
        },
        "PerformanceConsiderations": {
            "Optimizations": ["Caffeine cache for vets"],
            "Scalability": "Stateless controllers scale horizontally.",
            "Benchmarks": ["Gatling scenario in src/test"]
        },
        "TestingAndQualityAssurance": {
            "TestingStrategy": "Unit and integration tests.",
            "TestCoverage": "Controllers and repositories.",
            "TestCases": [{ "description": "Find owner", "expectedInput": "id=1", "expectedOutput": "George Franklin" }],
            "Tools": ["JUnit 5", "Mockito"]
        },
        "SecurityConsiderations": {
            "SensitiveDataHandling": "No sensitive data stored.",
            "AccessControl": "None.",
            "Vulnerabilities": ["No CSRF protection on forms"]
        },
        "VersionControlAndChangelog": {
            "GitHistory": "Maintained since 2013.",
            "Changelog": ["3.2.0: Spring Boot 3.2"]
        },
        "FAQ": {
            "CommonQuestions": ["Which database is used by default?"],
            "Troubleshooting": [{ "issue": "Port 8080 in use", "solution": "Set server.port" }]
        },
        "Appendix": {
            "Glossary": [{ "term": "Vet", "definition": "Veterinarian" }],
            "References": ["https://spring.io/guides"]
        },
        "Conclusion": {
            "Summary": "A compact reference application.",
            "NextSteps": "Try the REST variant."
        }
    })
}

/// 只保留指定章节的文档
pub fn partial_documentation(sections: &[SectionId]) -> Value {
    let full = full_documentation();
    let mut map = Map::new();
    for id in sections {
        if let Some(value) = full.get(id.key()) {
            map.insert(id.key().to_string(), value.clone());
        }
    }
    Value::Object(map)
}

/// 在随机端口启动模拟生成服务，返回基础 URL
pub async fn spawn_service(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}
