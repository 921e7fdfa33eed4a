//! Built-in portfolio content, served when no `PORTFOLIO_FILE` is configured.

use super::{Certification, Experience, Portfolio, Profile, Project, Skills, Socials};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_owned()).collect()
}

pub(super) fn builtin() -> Portfolio {
    Portfolio {
        profile: Profile {
            name: "Suki".into(),
            title: "AWS Cloud Engineer & DevOps Engineer".into(),
            intro: "AWS + DevOps engineer with 3 years at TCS (Bengaluru). I build reliable, secure cloud \
                    platforms on AWS with an automation-first mindset: Terraform IaC, Jenkins CI/CD, \
                    containerization, Linux, and solid networking."
                .into(),
            location: "Bengaluru, India".into(),
            resume_url: "https://example.com/suki-resume.pdf".into(),
            email: "suki.cloud.dev@example.com".into(),
            socials: Socials {
                linkedin: Some("https://www.linkedin.com/in/suki-aws-devops".into()),
                github: Some("https://github.com/suki-devops".into()),
                instagram: Some("https://instagram.com/suki_cloud".into()),
                x: Some("https://x.com/suki_cloud".into()),
            },
        },
        skills: Skills {
            primary: strings(&[
                "AWS EC2",
                "AWS VPC",
                "AWS IAM",
                "AWS S3",
                "AWS RDS",
                "Jenkins CI/CD",
                "Terraform",
                "Linux",
                "Bash",
                "Networking",
            ]),
            secondary: strings(&["Docker", "Kubernetes", "Git/GitHub", "Maven", "Nginx"]),
        },
        certifications: vec![
            Certification {
                name: "AWS Solutions Architect – Associate".into(),
                issuer: "Amazon Web Services".into(),
                valid_till: "Apr 2027".into(),
            },
            Certification {
                name: "AWS Cloud Practitioner".into(),
                issuer: "Amazon Web Services".into(),
                valid_till: "Apr 2027".into(),
            },
        ],
        experience: vec![Experience {
            company: "Tata Consultancy Services (TCS)".into(),
            role: "AWS & DevOps Engineer".into(),
            period: "Jun 2022 — Present".into(),
            summary: "Delivering and operating AWS infrastructure at scale: automated provisioning with \
                      Terraform, CI/CD with Jenkins, secure VPC/IAM designs, and observability."
                .into(),
            highlights: strings(&[
                "Provisioned multi-account AWS environments with Terraform modules",
                "Designed VPC networking (subnets, IGW/NAT, route tables, NACLs)",
                "Built secure IAM roles/policies for least-privilege access",
                "Automated blue/green deployments using Jenkins pipelines",
                "Optimized EC2 and RDS spend via right-sizing and scheduling",
                "Hardened Linux AMIs and implemented patching automation",
            ]),
        }],
        projects: vec![
            Project {
                name: "AWS Landing Zone with Terraform".into(),
                description: "Modular Terraform stack to bootstrap an AWS org: accounts, VPCs, IAM, S3, \
                              CloudTrail, and baseline guardrails."
                    .into(),
                tags: strings(&["Terraform", "AWS Organizations", "Security"]),
                link: "#".into(),
            },
            Project {
                name: "Jenkins CI/CD for Microservices".into(),
                description: "Declarative pipelines building Docker images, scanning, and deploying to \
                              Kubernetes with progressive delivery."
                    .into(),
                tags: strings(&["Jenkins", "Docker", "Kubernetes"]),
                link: "#".into(),
            },
            Project {
                name: "Nginx as Edge Gateway".into(),
                description: "Reverse proxy with TLS, rate limiting, and caching for multi-service ingress."
                    .into(),
                tags: strings(&["Nginx", "Security", "Performance"]),
                link: "#".into(),
            },
        ],
    }
}
