//! Built-in sample inputs for the generation probe.
//!
//! Used whenever the caller does not supply `--cv-file` / `--job-offer-file`.
//! The texts are the sample CV and job offer the service is known to handle
//! end to end, so a failing generation probe points at the deployment, not
//! at the input.

pub const SAMPLE_CV: &str = r#"JEAN DUPONT
Développeur Full Stack Senior
jean.dupont@email.com | +33 6 12 34 56 78
Paris, France

PROFESSIONAL SUMMARY
Développeur expérimenté avec 5 ans d'expérience dans le développement web full stack. Expertise en React, Node.js, et bases de données. Passionné par les technologies modernes et l'innovation.

EXPERIENCE PROFESSIONNELLE
Développeur Senior - TechCorp (2020-2024)
- Développement d'applications web avec React et Node.js
- Gestion d'équipe de 3 développeurs
- Mise en place de CI/CD avec Docker et Kubernetes
- Amélioration des performances de 40%

FORMATION
Master en Informatique - Université Paris-Saclay (2016-2018)
Licence en Informatique - Université Paris-Diderot (2014-2016)

COMPETENCES TECHNIQUES
- Langages: JavaScript, TypeScript, Python, Java
- Frontend: React, Vue.js, HTML5, CSS3, Tailwind CSS
- Backend: Node.js, Express.js, Django, Spring Boot
- Bases de données: PostgreSQL, MongoDB, Redis
- DevOps: Docker, Kubernetes, AWS, Git, CI/CD
- Outils: VS Code, Git, Jira, Figma

LANGUES
- Français: Natif
- Anglais: Courant (TOEIC 950)
- Espagnol: Intermédiaire"#;

pub const SAMPLE_JOB_OFFER: &str = r#"Développeur Full Stack Senior

Nous recherchons un développeur full stack senior pour rejoindre notre équipe dynamique.

Responsabilités:
- Développement d'applications web modernes
- Gestion d'équipe de développeurs
- Mise en place de solutions DevOps
- Optimisation des performances

Compétences requises:
- React, Node.js, TypeScript
- Docker, Kubernetes
- Bases de données (PostgreSQL, MongoDB)
- AWS, CI/CD
- Leadership d'équipe

Expérience: 5+ ans"#;
